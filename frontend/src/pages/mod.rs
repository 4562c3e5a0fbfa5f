pub mod add_apartment;
pub mod apartment_detail;
pub mod apartments;
pub mod favorites;
pub mod home;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;

pub use add_apartment::{AddApartmentPage, EditApartmentPage};
pub use apartment_detail::ApartmentDetailPage;
pub use apartments::ApartmentsPage;
pub use favorites::FavoritesPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
