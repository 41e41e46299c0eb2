pub mod statement;
pub mod search_query;
pub mod geo_query;

pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod activity_repo;
pub use activity_repo::ActivityRepository;
pub mod geo_repo;
pub use geo_repo::GeoRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
