//! 预导入模块，方便使用

pub use super::app_users::{
    ActiveModel as AppUserActiveModel, Entity as AppUsers, Model as AppUserModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::student_classes::{
    ActiveModel as StudentClassActiveModel, Entity as StudentClasses, Model as StudentClassModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teacher_classes::{
    ActiveModel as TeacherClassActiveModel, Entity as TeacherClasses, Model as TeacherClassModel,
};
