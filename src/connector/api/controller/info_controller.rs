use super::super::Container;

pub struct InfoController<'a> {
    container: &'a Container,
}

impl<'a> InfoController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn info(&self) -> String {
        let settings = self.container.settings();
        format!(
            "Bedrock Chat Configuration\n==========================\nModel:    {}\nFamily:   {}\nRegion:   {}\nEndpoint: {}\nClient:   {}",
            settings.model_id(),
            settings.model_family(),
            settings.region(),
            settings.endpoint(),
            self.container.client_name()
        )
    }
}
