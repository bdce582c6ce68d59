pub mod common;


#[cfg(test)]
mod test_stat_modifiers;
