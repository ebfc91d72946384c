pub mod like_routes;
