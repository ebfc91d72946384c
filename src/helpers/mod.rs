pub mod uuid_helpers;
