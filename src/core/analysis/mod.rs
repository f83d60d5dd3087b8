mod statistics;

pub use statistics::LabelStatistics;
