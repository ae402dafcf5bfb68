pub mod edital;
