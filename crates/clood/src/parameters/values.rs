use crate::schema::EnumOptions;

use super::EditorError;

/// Ordered value list for EnumDistance; position is the distance basis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumEditor {
    values: Vec<String>,
}

impl EnumEditor {
    pub fn new(options: &EnumOptions) -> Self {
        Self {
            values: options.values.clone(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn add(&mut self, value: impl Into<String>) -> Result<(), EditorError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EditorError::EmptyValue);
        }
        if self.values.contains(&value) {
            return Err(EditorError::DuplicateValue(value));
        }
        self.values.push(value);
        Ok(())
    }

    pub fn remove(&mut self, value: &str) -> Result<(), EditorError> {
        let index = self
            .values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| EditorError::UnknownValue(value.to_string()))?;
        self.values.remove(index);
        Ok(())
    }

    /// Swap with the previous value. Returns false at the top.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.values.len() {
            return false;
        }
        self.values.swap(index - 1, index);
        true
    }

    /// Swap with the next value. Returns false at the bottom.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.values.len() {
            return false;
        }
        self.values.swap(index, index + 1);
        true
    }

    pub fn to_options(&self) -> EnumOptions {
        EnumOptions {
            values: self.values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_reorder() {
        let mut editor = EnumEditor::default();
        editor.add("low").unwrap();
        editor.add("mid").unwrap();
        editor.add("high").unwrap();
        assert_eq!(
            editor.add("mid"),
            Err(EditorError::DuplicateValue("mid".to_string()))
        );
        assert_eq!(editor.add("  "), Err(EditorError::EmptyValue));

        assert!(editor.move_down(0));
        assert_eq!(editor.values(), ["mid", "low", "high"]);
        assert!(!editor.move_down(2));
        assert!(!editor.move_up(0));
        assert!(editor.move_up(2));
        assert_eq!(editor.values(), ["mid", "high", "low"]);

        editor.remove("high").unwrap();
        assert_eq!(editor.to_options().values, vec!["mid", "low"]);
        assert!(editor.remove("high").is_err());
    }
}
