// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests import modules from this crate root to reach the code under test.

pub mod core {
    pub mod grid;
    pub mod model;
    pub mod ports;
    pub mod reconcile;
    pub mod reference;
    pub mod validate;
    pub mod week;
}

pub mod application {
    pub mod errors;
    pub mod notices;
    pub mod register;
}

pub mod adapters {
    pub mod http {
        pub mod auth;
        pub mod client;
        pub mod clients;
        pub mod dto;
        pub mod employees;
        pub mod holidays_admin;
        pub mod notifications;
        pub mod reference;
        pub mod salary;
        pub mod timesheets;
    }
    pub mod in_memory {
        pub mod backend;
    }
}

pub mod shell {
    pub mod config;
}
