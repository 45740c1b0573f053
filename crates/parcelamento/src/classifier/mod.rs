pub mod company;
pub mod installment;

pub use company::{extract_company_name, extract_company_name_from_pages};
pub use installment::{classify, Classification};
