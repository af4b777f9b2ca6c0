use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::bag::BagRepositoryImpl;
use adapter::repository::establishment::EstablishmentRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use kernel::repository::bag::BagRepository;
use kernel::repository::establishment::EstablishmentRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::user::UserRepository;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    establishment_repository: Arc<dyn EstablishmentRepository>,
    bag_repository: Arc<dyn BagRepository>,
    user_repository: Arc<dyn UserRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let establishment_repository = Arc::new(EstablishmentRepositoryImpl::new(pool.clone()));
        let bag_repository = Arc::new(BagRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            establishment_repository,
            bag_repository,
            user_repository,
            reservation_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn establishment_repository(&self) -> Arc<dyn EstablishmentRepository> {
        self.establishment_repository.clone()
    }

    pub fn bag_repository(&self) -> Arc<dyn BagRepository> {
        self.bag_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }
}
