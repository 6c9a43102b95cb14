#[cfg(test)]
mod support;
mod sweep;
