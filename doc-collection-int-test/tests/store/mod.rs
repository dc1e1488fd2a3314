mod fjall_test;
mod shared_store_test;
