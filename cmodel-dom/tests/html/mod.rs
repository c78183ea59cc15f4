mod dark_mode;
mod export;
mod import;
