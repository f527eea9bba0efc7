pub mod creditworthiness;
