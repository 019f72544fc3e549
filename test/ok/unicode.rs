fn greet(name: &str) -> String {
    // «ünïcödé» before a brace shifts bytes, not columns
    format!("héllo {{}} {}", name)
}
