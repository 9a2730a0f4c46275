mod recycling;
