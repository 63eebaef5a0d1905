// Application layer: the concrete command set wired into the core runner.

pub mod commands;
