// Word counting over comment bodies.

pub mod frequency;
