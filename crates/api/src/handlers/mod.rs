pub mod movie_image;
pub mod venue;
