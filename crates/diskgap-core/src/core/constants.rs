/// Astronomical unit (cm).
pub const AU: f64 = 1.495_978_707e13;

/// Solar mass (g).
pub const M_SUN: f64 = 1.988_47e33;

/// Jupiter mass (g).
pub const M_JUP: f64 = 1.898_13e30;

/// Earth mass (g).
pub const M_EARTH: f64 = 5.972_2e27;
