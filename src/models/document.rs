use serde::Serialize;

use crate::models::employee::Employee;

/// One of the eleven named upload fields on the onboarding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSlot {
    ProfilePic,
    SalarySlip,
    OfferLetter,
    RelievingLetter,
    ExperienceCertificate,
    SscDoc,
    InterDoc,
    GradDoc,
    Resume,
    IdProof,
    SignedDocument,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 11] = [
        DocumentSlot::ProfilePic,
        DocumentSlot::SalarySlip,
        DocumentSlot::OfferLetter,
        DocumentSlot::RelievingLetter,
        DocumentSlot::ExperienceCertificate,
        DocumentSlot::SscDoc,
        DocumentSlot::InterDoc,
        DocumentSlot::GradDoc,
        DocumentSlot::Resume,
        DocumentSlot::IdProof,
        DocumentSlot::SignedDocument,
    ];

    /// Form field and column name.
    pub fn field_name(self) -> &'static str {
        match self {
            DocumentSlot::ProfilePic => "emp_profile_pic",
            DocumentSlot::SalarySlip => "emp_salary_slip",
            DocumentSlot::OfferLetter => "emp_offer_letter",
            DocumentSlot::RelievingLetter => "emp_relieving_letter",
            DocumentSlot::ExperienceCertificate => "emp_experience_certificate",
            DocumentSlot::SscDoc => "emp_ssc_doc",
            DocumentSlot::InterDoc => "emp_inter_doc",
            DocumentSlot::GradDoc => "emp_grad_doc",
            DocumentSlot::Resume => "resume",
            DocumentSlot::IdProof => "id_proof",
            DocumentSlot::SignedDocument => "signed_document",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentSlot::ProfilePic => "Profile Picture",
            DocumentSlot::SalarySlip => "Salary Slip",
            DocumentSlot::OfferLetter => "Offer Letter",
            DocumentSlot::RelievingLetter => "Relieving Letter",
            DocumentSlot::ExperienceCertificate => "Experience Certificate",
            DocumentSlot::SscDoc => "SSC Document",
            DocumentSlot::InterDoc => "Intermediate Document",
            DocumentSlot::GradDoc => "Graduation Document",
            DocumentSlot::Resume => "Resume",
            DocumentSlot::IdProof => "ID Proof",
            DocumentSlot::SignedDocument => "Signed Document",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }

    /// The stored filename this slot holds on `employee`, if any.
    pub fn stored_on(self, employee: &Employee) -> Option<&str> {
        let value = match self {
            DocumentSlot::ProfilePic => &employee.emp_profile_pic,
            DocumentSlot::SalarySlip => &employee.emp_salary_slip,
            DocumentSlot::OfferLetter => &employee.emp_offer_letter,
            DocumentSlot::RelievingLetter => &employee.emp_relieving_letter,
            DocumentSlot::ExperienceCertificate => &employee.emp_experience_certificate,
            DocumentSlot::SscDoc => &employee.emp_ssc_doc,
            DocumentSlot::InterDoc => &employee.emp_inter_doc,
            DocumentSlot::GradDoc => &employee.emp_grad_doc,
            DocumentSlot::Resume => &employee.resume,
            DocumentSlot::IdProof => &employee.id_proof,
            DocumentSlot::SignedDocument => &employee.signed_document,
        };
        value.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DocumentLink {
    pub url: String,
    pub name: &'static str,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for slot in DocumentSlot::ALL {
            assert_eq!(DocumentSlot::from_field_name(slot.field_name()), Some(slot));
        }
        assert_eq!(DocumentSlot::from_field_name("emp_name"), None);
    }

    #[test]
    fn field_names_are_distinct() {
        let mut names: Vec<_> = DocumentSlot::ALL.iter().map(|s| s.field_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 11);
    }
}
