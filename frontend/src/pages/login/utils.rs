pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Введите имя пользователя".into());
    }
    if password.is_empty() {
        return Err("Введите пароль".into());
    }
    Ok(())
}
