pub(crate) mod login_response;
