use derive_new::new;

#[derive(new, Debug)]
pub struct CreateEstablishment {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
}
