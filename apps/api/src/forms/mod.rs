// Validation behind the signup and profile forms: image uploads, password
// strength, submitted chip ids, the OTP boxes and their countdown, and the
// textarea character counters.

pub mod char_counter;
pub mod countdown;
pub mod handlers;
pub mod id_list;
pub mod image_check;
pub mod otp;
pub mod password;
