mod applied_version_info;

pub use applied_version_info::AppliedVersionFile;
