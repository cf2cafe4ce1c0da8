pub mod bottles;
pub mod moderation;
pub mod status;
pub mod tags;
