// Error codes for EasyMed components

pub mod voice {
    pub const CREDENTIAL_FETCH_FAILED: &str = "VOICE_1001";
    pub const DEVICE_UNAVAILABLE: &str = "VOICE_1002";
    pub const RECOGNITION_FAILED: &str = "VOICE_1003";
    pub const SYNTHESIS_FAILED: &str = "VOICE_1004";
}

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_2001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_2002";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_3001";
    pub const INVALID_OTP: &str = "AUTH_3002";
    pub const ACCESS_DENIED: &str = "AUTH_3003";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYS_4001";
    pub const NETWORK: &str = "SYS_4002";
    pub const INTERNAL: &str = "SYS_4003";
}
