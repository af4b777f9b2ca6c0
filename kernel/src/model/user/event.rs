use derive_new::new;

#[derive(new, Debug)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
}
