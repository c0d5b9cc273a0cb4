mod fixture;
pub use fixture::Fixture;
