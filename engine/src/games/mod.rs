pub mod ultimate;
