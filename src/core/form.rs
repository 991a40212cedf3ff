use crate::domain::model::ContactDetails;

/// Whether the contact step may be submitted: name and email must hold
/// something other than whitespace. The note is free-form.
pub fn is_submittable(contact: &ContactDetails) -> bool {
    !contact.name.trim().is_empty() && !contact.email.trim().is_empty()
}

/// Names of the required fields that are still blank.
pub fn missing_fields(contact: &ContactDetails) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if contact.name.trim().is_empty() {
        missing.push("name");
    }
    if contact.email.trim().is_empty() {
        missing.push("email");
    }
    missing
}
