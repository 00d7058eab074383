pub mod great_circle;
