use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::document::DocumentSlot;

/// One onboarding submission as stored in `employees`.
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub emp_name: String,
    pub emp_email: String,
    pub emp_gender: Option<String>,
    pub emp_marital_status: Option<String>,
    pub emp_dob: Option<NaiveDate>,
    pub emp_mobile: Option<String>,
    pub emp_address: Option<String>,
    pub emp_city: Option<String>,
    pub emp_state: Option<String>,
    pub emp_zipcode: Option<String>,
    pub emp_bank: Option<String>,
    pub emp_account: Option<String>,
    pub emp_ifsc: Option<String>,
    pub emp_bank_branch: Option<String>,
    pub emp_job_role: Option<String>,
    pub emp_department: Option<String>,
    pub emp_experience_status: Option<String>,
    pub emp_company_name: Option<String>,
    pub emp_years_of_experience: Option<i32>,
    pub emp_joining_date: Option<NaiveDate>,
    pub emp_profile_pic: Option<String>,
    pub emp_salary_slip: Option<String>,
    pub emp_offer_letter: Option<String>,
    pub emp_relieving_letter: Option<String>,
    pub emp_experience_certificate: Option<String>,
    pub emp_ssc_doc: Option<String>,
    pub ssc_school: Option<String>,
    pub ssc_year: Option<i32>,
    pub ssc_grade: Option<String>,
    pub emp_inter_doc: Option<String>,
    pub inter_college: Option<String>,
    pub inter_year: Option<i32>,
    pub inter_grade: Option<String>,
    pub inter_branch: Option<String>,
    pub emp_grad_doc: Option<String>,
    pub grad_college: Option<String>,
    pub grad_year: Option<i32>,
    pub grad_grade: Option<String>,
    pub grad_degree: Option<String>,
    pub grad_branch: Option<String>,
    pub resume: Option<String>,
    pub id_proof: Option<String>,
    pub signed_document: Option<String>,
    pub emp_terms_accepted: bool,
    pub primary_contact_name: Option<String>,
    pub primary_contact_relationship: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub primary_contact_email: Option<String>,
    pub uan_number: Option<String>,
    pub pf_number: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A stored record plus a `<slot>_url` entry for every document it references.
#[derive(Serialize, Debug)]
pub struct EmployeeWithUrls {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(flatten)]
    pub document_urls: BTreeMap<String, String>,
}

impl EmployeeWithUrls {
    pub fn new<F>(employee: Employee, url_for: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let document_urls = DocumentSlot::ALL
            .into_iter()
            .filter_map(|slot| {
                slot.stored_on(&employee)
                    .map(|filename| (format!("{}_url", slot.field_name()), url_for(filename)))
            })
            .collect();
        EmployeeWithUrls { employee, document_urls }
    }
}

/// Validated contents of a `/save-employee` submission, ready to insert.
#[derive(Debug, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 255, message = "Employee name is required"))]
    pub emp_name: String,
    #[validate(email(message = "A valid employee email is required"), length(max = 255))]
    pub emp_email: String,
    #[validate(length(max = 20))]
    pub emp_gender: Option<String>,
    #[validate(length(max = 20))]
    pub emp_marital_status: Option<String>,
    pub emp_dob: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub emp_mobile: Option<String>,
    pub emp_address: Option<String>,
    #[validate(length(max = 100))]
    pub emp_city: Option<String>,
    #[validate(length(max = 100))]
    pub emp_state: Option<String>,
    #[validate(length(max = 20))]
    pub emp_zipcode: Option<String>,
    #[validate(length(max = 255))]
    pub emp_bank: Option<String>,
    #[validate(length(max = 50))]
    pub emp_account: Option<String>,
    #[validate(length(max = 20))]
    pub emp_ifsc: Option<String>,
    #[validate(length(max = 100))]
    pub emp_bank_branch: Option<String>,
    #[validate(length(max = 255))]
    pub emp_job_role: Option<String>,
    #[validate(length(max = 255))]
    pub emp_department: Option<String>,
    #[validate(length(max = 20))]
    pub emp_experience_status: Option<String>,
    #[validate(length(max = 255))]
    pub emp_company_name: Option<String>,
    #[validate(range(min = 0))]
    pub emp_years_of_experience: Option<i32>,
    pub emp_joining_date: Option<NaiveDate>,
    #[validate(length(max = 255))]
    pub ssc_school: Option<String>,
    pub ssc_year: Option<i32>,
    #[validate(length(max = 20))]
    pub ssc_grade: Option<String>,
    #[validate(length(max = 255))]
    pub inter_college: Option<String>,
    pub inter_year: Option<i32>,
    #[validate(length(max = 20))]
    pub inter_grade: Option<String>,
    #[validate(length(max = 100))]
    pub inter_branch: Option<String>,
    #[validate(length(max = 255))]
    pub grad_college: Option<String>,
    pub grad_year: Option<i32>,
    #[validate(length(max = 20))]
    pub grad_grade: Option<String>,
    #[validate(length(max = 100))]
    pub grad_degree: Option<String>,
    #[validate(length(max = 100))]
    pub grad_branch: Option<String>,
    #[validate(length(max = 255))]
    pub primary_contact_name: Option<String>,
    #[validate(length(max = 100))]
    pub primary_contact_relationship: Option<String>,
    #[validate(length(max = 20))]
    pub primary_contact_phone: Option<String>,
    #[validate(email, length(max = 255))]
    pub primary_contact_email: Option<String>,
    #[validate(length(max = 50))]
    pub uan_number: Option<String>,
    #[validate(length(max = 50))]
    pub pf_number: Option<String>,
    pub emp_terms_accepted: bool,
    /// Stored filename per uploaded slot.
    pub documents: HashMap<DocumentSlot, String>,
}

impl NewEmployee {
    /// Parses the text parts of the multipart form. Empty values count as absent.
    pub fn from_form(
        form: &HashMap<String, String>,
        documents: HashMap<DocumentSlot, String>,
    ) -> Result<Self, AppError> {
        let text = |key: &str| {
            form.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let new_employee = NewEmployee {
            emp_name: text("emp_name").ok_or_else(|| AppError::BadRequest("Employee name is required".to_string()))?,
            emp_email: text("emp_email")
                .ok_or_else(|| AppError::BadRequest("Employee email is required".to_string()))?,
            emp_gender: text("emp_gender"),
            emp_marital_status: text("emp_marital_status"),
            emp_dob: parse_date("emp_dob", text("emp_dob"))?,
            emp_mobile: text("emp_mobile"),
            emp_address: text("emp_address"),
            emp_city: text("emp_city"),
            emp_state: text("emp_state"),
            emp_zipcode: text("emp_zipcode"),
            emp_bank: text("emp_bank"),
            emp_account: text("emp_account"),
            emp_ifsc: text("emp_ifsc"),
            emp_bank_branch: text("emp_bank_branch"),
            emp_job_role: text("emp_job_role"),
            emp_department: text("emp_department"),
            emp_experience_status: text("emp_experience_status"),
            emp_company_name: text("emp_company_name"),
            emp_years_of_experience: parse_int("emp_years_of_experience", text("emp_years_of_experience"))?,
            emp_joining_date: parse_date("emp_joining_date", text("emp_joining_date"))?,
            ssc_school: text("ssc_school"),
            ssc_year: parse_int("ssc_year", text("ssc_year"))?,
            ssc_grade: text("ssc_grade"),
            inter_college: text("inter_college"),
            inter_year: parse_int("inter_year", text("inter_year"))?,
            inter_grade: text("inter_grade"),
            inter_branch: text("inter_branch"),
            grad_college: text("grad_college"),
            grad_year: parse_int("grad_year", text("grad_year"))?,
            grad_grade: text("grad_grade"),
            grad_degree: text("grad_degree"),
            grad_branch: text("grad_branch"),
            primary_contact_name: text("primary_contact_name"),
            primary_contact_relationship: text("primary_contact_relationship"),
            primary_contact_phone: text("primary_contact_phone"),
            primary_contact_email: text("primary_contact_email"),
            uan_number: text("uan_number"),
            pf_number: text("pf_number"),
            emp_terms_accepted: parse_flag("emp_terms_accepted", text("emp_terms_accepted"))?,
            documents,
        };

        new_employee.validate()?;
        Ok(new_employee)
    }

    pub fn document(&self, slot: DocumentSlot) -> Option<&str> {
        self.documents.get(&slot).map(String::as_str)
    }
}

fn parse_int(field: &str, value: Option<String>) -> Result<Option<i32>, AppError> {
    value
        .map(|v| {
            v.parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("{} must be a whole number, got {:?}", field, v)))
        })
        .transpose()
}

fn parse_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("{} must be a date in YYYY-MM-DD form, got {:?}", field, v)))
        })
        .transpose()
}

fn parse_flag(field: &str, value: Option<String>) -> Result<bool, AppError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("true" | "on" | "yes" | "1") => Ok(true),
        Some("false" | "off" | "no" | "0") => Ok(false),
        Some(other) => Err(AppError::BadRequest(format!("{} must be true or false, got {:?}", field, other))),
    }
}
