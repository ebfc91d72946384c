pub mod like_controller;
