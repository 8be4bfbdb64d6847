//! `/employees`, including the convenience filters and the roster summary.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::require_text;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;

pub const MAX_EMPLOYEES_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetEmployeesArgs {
    pub page: Option<u32>,
    /// Results per page (max 100).
    pub page_size: Option<u32>,
    /// e.g. `admin`, `technician`, `office`.
    pub role: Option<String>,
    pub is_active: Option<bool>,
    /// Comma-separated tag IDs.
    pub tag_ids: Option<String>,
    pub employee_type: Option<String>,
    /// Only employees using the mobile app.
    pub mobile_user: Option<bool>,
    pub include_tags: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetEmployeeArgs {
    pub employee_id: String,
    pub include_tags: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchEmployeesArgs {
    /// Matched against name, email and phone.
    pub search_term: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub is_active: Option<bool>,
    pub include_tags: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EmployeesByRoleArgs {
    pub role: String,
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ActiveEmployeesArgs {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub include_tags: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MobileEmployeesArgs {
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_employees(&self, args: &GetEmployeesArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_EMPLOYEES_PAGE_SIZE),
            "role" => args.role.as_ref(),
            "is_active" => args.is_active,
            "tag_ids" => args.tag_ids.as_ref(),
            "employee_type" => args.employee_type.as_ref(),
            "mobile_user" => args.mobile_user,
            "include_tags" => args.include_tags,
            "sort_by" => args.sort_by.as_ref(),
            "sort_direction" => args.sort_direction.as_ref(),
        };
        self.get(&["employees"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_employee_by_id(&self, args: &GetEmployeeArgs) -> Result<Value> {
        let id = require_text("employee_id", &args.employee_id)?;
        let query = params! { "include_tags" => args.include_tags };
        self.get(&["employees", id.as_str()], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn search_employees(&self, args: &SearchEmployeesArgs) -> Result<Value> {
        let query = params! {
            "search" => Some(require_text("search_term", &args.search_term)?),
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_EMPLOYEES_PAGE_SIZE),
            "is_active" => args.is_active,
            "include_tags" => args.include_tags,
        };
        self.get(&["employees"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_employees_by_role(&self, args: &EmployeesByRoleArgs) -> Result<Value> {
        let query = params! {
            "role" => Some(require_text("role", &args.role)?),
            "is_active" => args.is_active,
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_EMPLOYEES_PAGE_SIZE),
        };
        self.get(&["employees"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_active_employees(&self, args: &ActiveEmployeesArgs) -> Result<Value> {
        let query = params! {
            "is_active" => Some(true),
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_EMPLOYEES_PAGE_SIZE),
            "include_tags" => args.include_tags,
            "sort_by" => args.sort_by.as_ref(),
            "sort_direction" => args.sort_direction.as_ref(),
        };
        self.get(&["employees"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_mobile_employees(&self, args: &MobileEmployeesArgs) -> Result<Value> {
        let query = params! {
            "mobile_user" => Some(true),
            "is_active" => args.is_active,
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_EMPLOYEES_PAGE_SIZE),
        };
        self.get(&["employees"], Some(&query)).await
    }

    /// Fetch the first 100 employees and render a plain-text roster summary.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn summarize_employees(&self) -> Result<String> {
        let query = params! { "page_size" => Some(MAX_EMPLOYEES_PAGE_SIZE) };
        let body = self.get(&["employees"], Some(&query)).await?;
        Ok(summarize_employees(&body))
    }
}

/// Render counts by status, mobile usage and role from an `/employees` response.
#[must_use]
pub fn summarize_employees(body: &Value) -> String {
    let employees = body
        .get("employees")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if employees.is_empty() {
        return "No employees found.".to_string();
    }

    let flag = |emp: &Value, key: &str| emp.get(key).and_then(Value::as_bool).unwrap_or(false);

    let total = employees.len();
    let active = employees.iter().filter(|e| flag(e, "is_active")).count();
    let mobile = employees.iter().filter(|e| flag(e, "mobile_user")).count();

    let mut roles: BTreeMap<&str, usize> = BTreeMap::new();
    for emp in employees {
        let role = emp.get("role").and_then(Value::as_str).unwrap_or("Unknown");
        *roles.entry(role).or_default() += 1;
    }

    let mut out = String::from("Employee Summary:\n");
    let _ = writeln!(out, "Total Employees: {total}");
    let _ = writeln!(out, "Active: {active} | Inactive: {}", total - active);
    let _ = writeln!(out, "Mobile Users: {mobile}");
    out.push_str("\nEmployees by Role:\n");
    for (role, count) in roles {
        let _ = writeln!(out, "  {role}: {count}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::summarize_employees;
    use serde_json::json;

    #[test]
    fn empty_roster() {
        assert_eq!(summarize_employees(&json!({"employees": []})), "No employees found.");
        assert_eq!(summarize_employees(&json!({})), "No employees found.");
    }

    #[test]
    fn counts_status_mobile_and_roles() {
        let body = json!({"employees": [
            {"role": "technician", "is_active": true, "mobile_user": true},
            {"role": "admin", "is_active": true},
            {"role": "technician", "is_active": false, "mobile_user": true},
            {"is_active": true},
        ]});
        let summary = summarize_employees(&body);
        assert_eq!(
            summary,
            "Employee Summary:\n\
             Total Employees: 4\n\
             Active: 3 | Inactive: 1\n\
             Mobile Users: 2\n\
             \n\
             Employees by Role:\n  \
             Unknown: 1\n  \
             admin: 1\n  \
             technician: 2\n"
        );
    }
}
