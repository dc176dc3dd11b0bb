pub mod answers;
pub mod pillar;
pub mod profile;
pub mod question;
pub mod report;
