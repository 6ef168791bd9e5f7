/// Partial update of a user.
///
/// `None` leaves the stored value untouched, `Some` overwrites it (an empty
/// string included).
#[derive(Debug, Clone, Default)]
pub struct EditUserData {
    pub username: Option<String>,
    pub passphrase: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl EditUserData {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.passphrase.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }
}
