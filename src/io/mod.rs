pub mod logging;
pub mod paths;
pub mod settings_io;
