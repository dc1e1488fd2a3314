mod builder_test;
mod crud_test;
mod update_test;
