pub mod annotate_folder_use_case;
pub mod annotate_image_use_case;
pub mod error;
pub mod outcome;
