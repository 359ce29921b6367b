pub mod candidate;

pub use candidate::CandidateRow;
