pub mod auth;
pub mod banners;
pub mod cities;
pub mod dashboard;
pub mod health;
pub mod images;
pub mod leads;
pub mod neighborhoods;
pub mod profiles;
pub mod properties;
