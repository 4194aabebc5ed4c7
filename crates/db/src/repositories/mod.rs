mod appointment_type_repo;
mod client_repo;
mod scheduling_config_repo;
mod scheduling_repo;
mod tenant_repo;
mod weekly_availability_repo;
mod worker_repo;

pub use appointment_type_repo::AppointmentTypeRepository;
pub use client_repo::ClientRepository;
pub use scheduling_config_repo::SchedulingConfigRepository;
pub use scheduling_repo::SchedulingRepository;
pub use tenant_repo::TenantRepository;
pub use weekly_availability_repo::WeeklyAvailabilityRepository;
pub use worker_repo::WorkerRepository;
