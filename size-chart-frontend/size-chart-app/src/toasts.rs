use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub level: ToastLevel,
    pub duration: Option<u64>,
}

/// User facing notices, newest last. Expiry is left to whoever draws them, using `duration`.
#[derive(Clone, Debug, Default)]
pub struct Toasts(Vec<Toast>);

impl Toasts {
    pub fn add(
        &mut self,
        message: impl Into<String>,
        level: ToastLevel,
        duration: Option<u64>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.0.push(Toast {
            id,
            message: message.into(),
            level,
            duration,
        });
        id
    }

    pub fn remove(&mut self, id: Uuid) {
        if let Some(index) = self.0.iter().position(|t| t.id == id) {
            self.0.remove(index);
        }
    }

    pub fn all(&self) -> &[Toast] {
        &self.0
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.0.last()
    }

    pub fn info(&mut self, message: impl Into<String>) -> Uuid {
        self.add(message, ToastLevel::Info, Some(3000))
    }

    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        self.add(message, ToastLevel::Error, Some(5000))
    }
}
