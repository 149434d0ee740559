pub mod common;




#[cfg(test)]
mod test_flee;

#[cfg(test)]
mod test_submission;
