pub mod report_model;
pub mod report_service;
pub mod report_traits;


pub use report_model::*;
pub use report_service::ReportService;
pub use report_traits::ReportServiceTrait;
