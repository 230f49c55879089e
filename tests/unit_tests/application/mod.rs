mod completion_adapter_test;
