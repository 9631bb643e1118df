pub mod banner;
pub mod city;
pub mod dashboard;
pub mod lead;
pub mod neighborhood;
pub mod profile;
pub mod property;
pub mod user;
