/// Data for a new user. The passphrase is plaintext here; the service hashes
/// it before anything reaches the repository.
#[derive(Debug, Clone, Default)]
pub struct NewUserData {
    pub username: String,
    pub passphrase: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}
