pub mod transxchange;
