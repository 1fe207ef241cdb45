use sqlx::PgConnection;

use crate::models::document::DocumentSlot;
use crate::models::employee::{Employee, NewEmployee};

const INSERT_EMPLOYEE: &str = r#"
    INSERT INTO employees (
        emp_name, emp_email, emp_gender, emp_marital_status, emp_dob, emp_mobile,
        emp_address, emp_city, emp_state, emp_zipcode, emp_bank, emp_account,
        emp_ifsc, emp_bank_branch, emp_job_role, emp_department, emp_experience_status,
        emp_company_name, emp_years_of_experience, emp_joining_date, emp_profile_pic,
        emp_salary_slip, emp_offer_letter, emp_relieving_letter, emp_experience_certificate,
        emp_ssc_doc, ssc_school, ssc_year, ssc_grade, emp_inter_doc, inter_college,
        inter_year, inter_grade, inter_branch, emp_grad_doc, grad_college, grad_year,
        grad_grade, grad_degree, grad_branch, resume, id_proof, signed_document,
        primary_contact_name, primary_contact_relationship, primary_contact_phone,
        primary_contact_email, uan_number, pf_number, emp_terms_accepted
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
        $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
        $21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
        $31, $32, $33, $34, $35, $36, $37, $38, $39, $40,
        $41, $42, $43, $44, $45, $46, $47, $48, $49, $50
    )
    RETURNING id
"#;

/// Inserts one submission and returns its generated id.
pub async fn insert(conn: &mut PgConnection, e: &NewEmployee) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(INSERT_EMPLOYEE)
        .bind(&e.emp_name)
        .bind(&e.emp_email)
        .bind(&e.emp_gender)
        .bind(&e.emp_marital_status)
        .bind(e.emp_dob)
        .bind(&e.emp_mobile)
        .bind(&e.emp_address)
        .bind(&e.emp_city)
        .bind(&e.emp_state)
        .bind(&e.emp_zipcode)
        .bind(&e.emp_bank)
        .bind(&e.emp_account)
        .bind(&e.emp_ifsc)
        .bind(&e.emp_bank_branch)
        .bind(&e.emp_job_role)
        .bind(&e.emp_department)
        .bind(&e.emp_experience_status)
        .bind(&e.emp_company_name)
        .bind(e.emp_years_of_experience)
        .bind(e.emp_joining_date)
        .bind(e.document(DocumentSlot::ProfilePic))
        .bind(e.document(DocumentSlot::SalarySlip))
        .bind(e.document(DocumentSlot::OfferLetter))
        .bind(e.document(DocumentSlot::RelievingLetter))
        .bind(e.document(DocumentSlot::ExperienceCertificate))
        .bind(e.document(DocumentSlot::SscDoc))
        .bind(&e.ssc_school)
        .bind(e.ssc_year)
        .bind(&e.ssc_grade)
        .bind(e.document(DocumentSlot::InterDoc))
        .bind(&e.inter_college)
        .bind(e.inter_year)
        .bind(&e.inter_grade)
        .bind(&e.inter_branch)
        .bind(e.document(DocumentSlot::GradDoc))
        .bind(&e.grad_college)
        .bind(e.grad_year)
        .bind(&e.grad_grade)
        .bind(&e.grad_degree)
        .bind(&e.grad_branch)
        .bind(e.document(DocumentSlot::Resume))
        .bind(e.document(DocumentSlot::IdProof))
        .bind(e.document(DocumentSlot::SignedDocument))
        .bind(&e.primary_contact_name)
        .bind(&e.primary_contact_relationship)
        .bind(&e.primary_contact_phone)
        .bind(&e.primary_contact_email)
        .bind(&e.uan_number)
        .bind(&e.pf_number)
        .bind(e.emp_terms_accepted)
        .fetch_one(conn)
        .await
}

pub async fn list(conn: &mut PgConnection) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY created_at DESC, id DESC")
        .fetch_all(conn)
        .await
}

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE emp_email = $1")
        .bind(email)
        .fetch_optional(conn)
        .await
}
