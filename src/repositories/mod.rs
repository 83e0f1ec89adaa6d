pub mod assessment_repository;
pub mod class_repository;
pub mod grade_config_repository;
pub mod report_card_repository;
pub mod school_repository;
pub mod student_repository;
pub mod subject_repository;
pub mod teacher_repository;
pub mod user_repository;

pub use assessment_repository::{AssessmentRepository, ScoreWrite, UpsertOutcome};
pub use class_repository::ClassRepository;
pub use grade_config_repository::{ActiveGradeConfig, GradeConfigRepository, GradeConfigUpdate};
pub use report_card_repository::{ReportCardRepository, ReportCardUpsert};
pub use school_repository::{SchoolRepository, SchoolUpdate};
pub use student_repository::{StudentRepository, StudentUpdate};
pub use subject_repository::SubjectRepository;
pub use teacher_repository::TeacherRepository;
pub use user_repository::UserRepository;
