mod api_forms_router;
mod mocks;
