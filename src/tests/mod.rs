mod expr;
mod term;
