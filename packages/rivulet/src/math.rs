pub mod ceil_div;
pub mod rate;
pub mod safe_math;
