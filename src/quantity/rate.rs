quantity!(KilowattHourRate, "/kWh", 4);
