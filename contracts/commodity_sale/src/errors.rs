use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3) ---
    Unauthorized = 3,

    // --- State and input (4–5) ---
    InvalidState = 4,
    InvalidArgument = 5,

    // --- Purchase gates (6–7) ---
    StalePrice = 6,
    BelowMinimum = 7,

    // --- Funds (8) ---
    InsufficientFunds = 8,

    // --- Oracle (9) ---
    UnknownCallback = 9,
}
