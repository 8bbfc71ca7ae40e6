pub mod biddtos;
pub mod chatdtos;
pub mod paymentdtos;
pub mod requestdtos;
pub mod settingsdtos;
pub mod userdtos;
