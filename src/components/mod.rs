pub mod canvas_scene;
pub mod circuit_background;
pub mod contact;
pub mod hero;
pub mod loading_screen;
pub mod navbar;
pub mod projects;
pub mod sections;
pub mod star_background;
pub mod theme;
